pub mod logging;
pub mod tenant;
pub mod token;
