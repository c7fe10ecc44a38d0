pub mod manager;
pub mod run;
pub mod traits;

pub use manager::{ConfigManager, FlameConfig};
pub use run::RunConfig;
pub use traits::{ConfigManifest, ConfigSection, FieldManifest};
