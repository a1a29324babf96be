pub mod analysis;
pub mod candle;
pub mod enriched;

pub use analysis::*;
pub use candle::*;
pub use enriched::*;
