pub mod optimizer;
pub mod palette_input;
pub mod run_store;

pub use optimizer::{ActiveRun, CancelFlag, OptimizerService};
pub use palette_input::{parse_palette_list, parse_palette_text, ParsedPalette};
pub use run_store::RunStore;
