mod decode;
pub use decode::{decode, Dict, Error, Result, Value};

mod encode;
pub use encode::{
    encode, encode_value, encode_with, DictEncoder, Encode, Encoder, EncoderConfig, ListEncoder,
};
