#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_cfg as cfg;
pub use vc_serde as serde;
pub use vc_utils as utils;
