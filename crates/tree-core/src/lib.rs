pub mod bow;
pub mod carousel;
pub mod constants;
pub mod error;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod particles;
pub mod scene;
pub mod state;

pub use bow::*;
pub use carousel::*;
pub use constants::*;
pub use error::*;
pub use input::*;
pub use interaction::*;
pub use layout::*;
pub use particles::*;
pub use scene::*;
pub use state::*;
