//! Grain Contract Management - Dashboard Client
//!
//! Renders the contract detail view in the terminal: reconciled quantity
//! overview, sub-contract cards with progress bars, and the allocation
//! ring summary. The contract record is read from a JSON file (as cached
//! by the contract list view); the sub-contract list and the seller
//! address are fetched from the CRM.

use shared::models::{Contract, ParticipantRole};
use shared::progress::{FieldSource, MetricSide, ValueFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dashboard;
mod error;
mod external;
mod freshness;

pub use config::Config;

use external::CrmClient;
use freshness::RequestSequencer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gcm_dashboard=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Grain Contract Management dashboard client");
    tracing::info!("Environment: {}", config.environment);

    let contract_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: gcm-dashboard <contract.json>"))?;
    let contract: Contract = serde_json::from_str(&std::fs::read_to_string(&contract_path)?)?;

    tracing::info!(folio = %contract.folio, "Rendering contract detail");

    let crm = CrmClient::new(&config.crm)?;
    let sequencer: RequestSequencer<String> = RequestSequencer::new();
    let ticket = sequencer.issue(contract.id.clone());

    // The two fetches are independent; neither blocks the other, and a
    // failure in either degrades to a placeholder value.
    let seller_id = contract
        .participant(ParticipantRole::Seller)
        .and_then(|p| p.people_id.clone());
    let (raw_subs, seller_address) = tokio::join!(
        crm.sub_contracts_or_empty(&contract.id),
        async {
            match seller_id {
                Some(id) => crm.address_or_placeholder(&id).await,
                None => external::crm::ADDRESS_UNAVAILABLE.to_string(),
            }
        }
    );

    if !sequencer.accept(&ticket) {
        tracing::warn!(contract_id = %contract.id, "stale response discarded");
        return Ok(());
    }

    let dashboard = dashboard::compose(&contract, &raw_subs, seller_address);
    render(&dashboard);

    Ok(())
}

fn render(dashboard: &dashboard::ContractDashboard) {
    println!("Contract #{}", dashboard.folio);
    println!("Seller address: {}", dashboard.seller_address);
    println!();

    let s = &dashboard.snapshot;
    println!("Quantity overview");
    println!(
        "  Fixed    {:>12.2}  ({:.0}%)   Open        {:>12.2}",
        s.fixed, s.fixed_percentage, s.open
    );
    println!(
        "  Reserved {:>12.2}  ({:.0}%)   Available   {:>12.2}",
        s.reserved, s.reserved_percentage, s.available
    );
    println!(
        "  Settled  {:>12.2}  ({:.0}%)   Unsettled   {:>12.2}",
        s.settled, s.settled_percentage, s.unsettled
    );
    println!();

    println!("Sub-contracts ({})", dashboard.cards.len());
    let fields = dashboard::default_field_config();
    for card in &dashboard.cards {
        println!("  {}  qty {:>10.2}", card.record.contract_number, card.record.quantity);
        for field in &fields {
            let value = card.record.field(field.key).unwrap_or(0.0);
            match field.format {
                Some(ValueFormat::Currency) => {
                    println!("    {:<12} $ {:>12.2}", field.label, value);
                }
                None => {
                    println!(
                        "    {:<12} {:>14.2} {}",
                        field.label,
                        value,
                        field.unit.as_deref().unwrap_or("")
                    );
                }
            }
        }
        let winner = match card.progress.color_winner {
            MetricSide::Settled => "settled",
            MetricSide::Reserved => "reserved",
        };
        println!(
            "    progress: settled {:.0}% / reserved {:.0}%  [{}]",
            card.progress.left_pct, card.progress.right_pct, winner
        );
    }
    println!();

    println!(
        "Allocation ring: {:.0}% of fixed quantity committed",
        dashboard.chart.total_percentage
    );
    for segment in &dashboard.chart.segments {
        println!(
            "  {}  {:>10.2}  {:6.1}° - {:6.1}°",
            segment.label, segment.value, segment.start_angle, segment.end_angle
        );
    }
}
