// Tax module - lot matching, jurisdiction rules, real-earnings adjustment

pub mod engine;
pub mod jurisdiction;
pub mod method;
pub mod real_earnings;

pub use engine::{compute, Disposal, TaxReport, Term};
pub use jurisdiction::{Jurisdiction, JurisdictionRules};
pub use method::CostBasisMethod;
pub use real_earnings::{adjust, RealEarnings};
