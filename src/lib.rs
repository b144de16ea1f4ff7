// auction-pricing: bid/ask pricing and order economics for the auction front-end.
// pure computation over explicit inputs. the SDK, wallet and UI live elsewhere.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Side, OptionType, Currency, Price
//        quoting.rs: QuotingParams snapshot, SpreadSource
//   2.x  pricing.rs: spread resolution, bid/ask, floors, forwards
//   3.x  orders.rs: order legs, net price, close position orders
//        collateral.rs: locked collateral, per-currency summaries
//   4.x  format.rs: token units, currency display, addresses
//   5.x  contracts.rs: contract list filtering, expiries
//   6.x  config.rs: quoting defaults, precision, token decimals, presets

pub mod collateral;
pub mod config;
pub mod contracts;
pub mod format;
pub mod orders;
pub mod pricing;
pub mod quoting;
pub mod types;

// re exports for convenience
pub use collateral::*;
pub use contracts::*;
pub use format::*;
pub use orders::*;
pub use pricing::*;
pub use quoting::*;
pub use types::*;
pub use config::{ConfigError, CurrencyPrecision, Environment, PricingConfig};
