pub mod relay;

pub use relay::RelayQueryUseCase;
