mod command_sink;
pub mod elpris;
pub mod mqtt;
mod price_source;

pub use self::{
    command_sink::{CommandSink, DryRun},
    price_source::PriceSource,
};
