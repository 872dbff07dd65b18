// Adapters layer: concrete implementations for external systems (provider http client, local storage).

pub mod iplocate;
pub mod storage;
