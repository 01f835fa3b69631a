pub mod aggregate;
pub mod filter;
pub mod line_item;

pub use aggregate::{CalculationOutcome, CalculationRequest, DraftInfo, LineItem, RequestKey};
pub use filter::{RequestListFilter, RequestListQuery};
pub use line_item::{InvalidSpend, LineItemEnvelope, LineItemUpdate, UpdateLineItemBody};
