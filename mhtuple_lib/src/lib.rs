pub mod error;
pub mod multihash;
pub mod codec;
pub mod response;
pub mod fixed_width;
pub mod owner;
pub mod store;

pub use codec::{decode, decode_response_tuple, encode, encode_strict, parse_response_tuple};
pub use error::Error;
pub use multihash::Multihash;
pub use response::ContractResponse;
