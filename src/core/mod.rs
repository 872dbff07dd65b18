pub mod aggregator;
pub mod classifier;
pub mod export;
pub mod formatter;
pub mod input;
pub mod locator;
pub mod lookup;

pub use crate::domain::model::{
    AbuseInfo, Address, AddressClass, AsnInfo, BatchOutcome, Classification, CompanyInfo,
    HostingInfo, LookupError, LookupResult, LookupSlots, OutcomeStatus, PrivacyInfo,
};
pub use crate::domain::ports::{ConfigProvider, GeoProvider, Storage};
pub use crate::utils::error::Result;
