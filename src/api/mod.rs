pub mod optimize;
pub mod simulate;
pub mod spaces;

pub use optimize::{__path_handle_cancel, __path_handle_last, __path_handle_optimize};
pub use optimize::{handle_cancel, handle_last, handle_optimize, CancelResponse, OptimizeRequest};
pub use simulate::{handle_simulate, SimulateRequest, SimulateResponse, SimulatedState};
pub use simulate::{simulate_colors, __path_handle_simulate};
pub use spaces::{handle_spaces, ChannelSchema, SpaceSchema, __path_handle_spaces};
