use js_sys::{Array, BigInt, Function, Object, Reflect};
use mhtuple::{codec, ContractResponse, Multihash};
use wasm_bindgen::{prelude::*, JsCast};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "{ digest: string, hashFunction: number, size: number }")]
    pub type MultihashObject;

    #[wasm_bindgen(typescript_type = "[string, any, any]")]
    pub type ContractResponseArray;
}

#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::default());
}

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&format!("Error: {}", e))
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsError> {
    Reflect::get(target, &JsValue::from_str(key))
        .map_err(|_| JsError::new(&format!("cannot read property {}", key)))
}

/// Converts a number, a BigInt or a BN-style object with `toNumber()` into a byte.
fn js_to_byte(value: &JsValue, field: &'static str) -> Result<u8, JsError> {
    use mhtuple::response::ToByte;

    if let Some(n) = value.as_f64() {
        return n.to_byte(field).map_err(to_js_error);
    }
    if value.is_bigint() {
        let s: String = value
            .clone()
            .unchecked_into::<BigInt>()
            .to_string(10)
            .map_err(|_| JsError::new("BigInt is not printable"))?
            .into();
        return s.to_byte(field).map_err(to_js_error);
    }
    if value.is_object() {
        let to_number = get(value, "toNumber")?;
        if to_number.is_function() {
            let n = to_number
                .unchecked_into::<Function>()
                .call0(value)
                .map_err(|_| JsError::new(&format!("{}.toNumber() threw", field)))?;
            return js_to_byte(&n, field);
        }
    }
    Err(JsError::new(&format!("{} is not a number", field)))
}

fn multihash_to_object(m: &Multihash) -> Result<MultihashObject, JsError> {
    let obj = Object::new();
    let set = |k: &str, v: JsValue| {
        Reflect::set(&obj, &JsValue::from_str(k), &v)
            .map_err(|_| JsError::new(&format!("cannot set property {}", k)))
    };
    set("digest", JsValue::from_str(m.digest()))?;
    set("hashFunction", JsValue::from(m.hash_function()))?;
    set("size", JsValue::from(m.size()))?;
    Ok(JsValue::from(obj).into())
}

fn object_to_multihash(obj: &JsValue) -> Result<Multihash, JsError> {
    let digest = get(obj, "digest")?
        .as_string()
        .ok_or_else(|| JsError::new("digest is not a string"))?;
    let hash_function = js_to_byte(&get(obj, "hashFunction")?, "hashFunction")?;
    let size = js_to_byte(&get(obj, "size")?, "size")?;
    Ok(Multihash::new(digest, hash_function, size))
}

fn array_to_response(response: &JsValue) -> Result<ContractResponse<u8>, JsError> {
    if !Array::is_array(response) {
        return Err(JsError::new("contract response is not an array"));
    }
    let arr = Array::from(response);
    let digest = arr
        .get(0)
        .as_string()
        .ok_or_else(|| JsError::new("digest is not a string"))?;
    Ok(ContractResponse::new(
        digest,
        js_to_byte(&arr.get(1), "hashFunction")?,
        js_to_byte(&arr.get(2), "size")?,
    ))
}

#[wasm_bindgen(js_name = getBytes32FromMultihash)]
pub fn get_bytes32_from_multihash(multihash: &str) -> Result<MultihashObject, JsError> {
    let m = codec::decode(multihash).map_err(to_js_error)?;
    multihash_to_object(&m)
}

#[wasm_bindgen(js_name = getMultihashFromBytes32)]
pub fn get_multihash_from_bytes32(multihash: MultihashObject) -> Result<Option<String>, JsError> {
    let m = object_to_multihash(&multihash.into())?;
    codec::encode(&m).map_err(to_js_error)
}

#[wasm_bindgen(js_name = parseContractResponse)]
pub fn parse_contract_response(response: ContractResponseArray) -> Result<MultihashObject, JsError> {
    let r = array_to_response(&response.into())?;
    let m = codec::parse_response_tuple(r).map_err(to_js_error)?;
    multihash_to_object(&m)
}

#[wasm_bindgen(js_name = getMultihashFromContractResponse)]
pub fn get_multihash_from_contract_response(
    response: ContractResponseArray,
) -> Result<Option<String>, JsError> {
    let r = array_to_response(&response.into())?;
    codec::decode_response_tuple(r).map_err(to_js_error)
}
