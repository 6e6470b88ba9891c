pub mod gateway;

pub use gateway::{spawn_maintenance, EngineSnapshot, GatewayReply, GatewayService};
