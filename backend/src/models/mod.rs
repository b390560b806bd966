pub mod band;
pub mod breakdown;
pub mod scale;

pub use band::Band;
pub use breakdown::{
    ceil_currency, BreakdownLine, JointProductRate, LuggageRate, RateBreakdown, RateQuote,
};
pub use scale::{ScaleCode, ScaleSelection};
