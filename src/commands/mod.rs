pub mod print;
pub mod screenshot;

pub use print::run_print;
pub use screenshot::run_screenshot;
