pub mod destination_uri;
pub mod http;
pub mod phone_number;
pub mod setting;
pub mod trunk;
pub mod whitelisted_ip;
