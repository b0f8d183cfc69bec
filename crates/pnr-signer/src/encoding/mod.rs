mod packed;

pub use packed::{
    ADDRESS_WIDTH, AuthorizationFields, CHAIN_ID_WIDTH, CONTENT_ID_WIDTH, DAY_ID_WIDTH,
    DOMAIN_TAG, EXPIRES_AT_WIDTH, PACKED_LEN, content_id_hash,
};
