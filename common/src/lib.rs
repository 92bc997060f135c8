pub mod buffer2;
pub mod file_format;
pub mod float_ext;
pub mod log_setup;
pub mod parallel;

pub use buffer2::Buffer2;
pub use file_format::{
    deserialize, load_from_file, save_to_file, serialize, FileExtensionError, SerdeFormat,
    SerdeFormatError, SerdeFormatResult,
};
pub use float_ext::FloatExt;
pub use log_setup::setup_logging;

pub const EPSILON: f64 = 1e-6;
