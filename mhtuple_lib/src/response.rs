//! Contract responses
//!
//! A getter on the storage contract returns `(bytes32 digest, uint8 hashFunction, uint8 size)`.
//! Client libraries hand the two integers back wrapped in whatever big-number type they use,
//! so the tuple is generic over the numeric wrapper and the conversion to a byte is explicit.

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractResponse<N> {
    pub digest: String,
    pub hash_function: N,
    pub size: N,
}

impl<N> ContractResponse<N> {
    pub fn new(digest: impl Into<String>, hash_function: N, size: N) -> Self {
        ContractResponse { digest: digest.into(), hash_function, size }
    }
}

impl<N> From<(String, N, N)> for ContractResponse<N> {
    fn from((digest, hash_function, size): (String, N, N)) -> Self {
        ContractResponse { digest, hash_function, size }
    }
}

impl<N> From<(&str, N, N)> for ContractResponse<N> {
    fn from((digest, hash_function, size): (&str, N, N)) -> Self {
        ContractResponse::new(digest, hash_function, size)
    }
}

/// Lossless conversion of a numeric wrapper into a byte.
///
/// Values outside `0..=255` are rejected rather than truncated.
pub trait ToByte {
    fn to_byte(&self, field: &'static str) -> Result<u8, Error>;
}

fn out_of_range(field: &'static str, value: impl ToString) -> Error {
    Error::OutOfRange { field, value: value.to_string() }
}

macro_rules! impl_to_byte_for_int {
    ($($t:ty),*) => {
        $(
            impl ToByte for $t {
                fn to_byte(&self, field: &'static str) -> Result<u8, Error> {
                    u8::try_from(*self).map_err(|_| out_of_range(field, self))
                }
            }
        )*
    };
}

impl_to_byte_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// JS numbers arrive as doubles
impl ToByte for f64 {
    fn to_byte(&self, field: &'static str) -> Result<u8, Error> {
        let v = *self;
        if v.fract() != 0.0 || !(0.0..=255.0).contains(&v) {
            return Err(out_of_range(field, v));
        }
        Ok(v as u8)
    }
}

/// Decimal strings, as produced by `BN.toString()` and friends.
impl ToByte for str {
    fn to_byte(&self, field: &'static str) -> Result<u8, Error> {
        self.trim().parse::<u8>().map_err(|_| out_of_range(field, self))
    }
}

impl ToByte for String {
    fn to_byte(&self, field: &'static str) -> Result<u8, Error> {
        self.as_str().to_byte(field)
    }
}

impl<T: ToByte + ?Sized> ToByte for &T {
    fn to_byte(&self, field: &'static str) -> Result<u8, Error> {
        (**self).to_byte(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_to_byte() {
        assert_eq!(18u64.to_byte("hashFunction").unwrap(), 18);
        assert_eq!(255i32.to_byte("size").unwrap(), 255);
        assert!(matches!(
            256u32.to_byte("size"),
            Err(Error::OutOfRange { field: "size", .. })
        ));
        assert!((-1i64).to_byte("size").is_err());
    }

    #[test]
    fn test_float_to_byte() {
        assert_eq!(32.0f64.to_byte("size").unwrap(), 32);
        assert!(1.5f64.to_byte("size").is_err());
        assert!(f64::NAN.to_byte("size").is_err());
        assert!(300.0f64.to_byte("size").is_err());
    }

    #[test]
    fn test_decimal_string_to_byte() {
        assert_eq!("18".to_byte("hashFunction").unwrap(), 18);
        assert_eq!(String::from(" 32 ").to_byte("size").unwrap(), 32);
        assert!("0x12".to_byte("hashFunction").is_err());
        assert!("1000".to_byte("size").is_err());
    }

    #[test]
    fn test_tuple_conversion() {
        let r: ContractResponse<u64> = ("0xabcd", 18, 2).into();
        assert_eq!(r, ContractResponse::new("0xabcd", 18, 2));
    }
}
