mod model;
mod repository;

pub use model::CurrencyPreferenceDB;
pub use repository::CurrencyPreferenceRepository;
