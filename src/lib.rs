#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use amf_mapping as mapping;
pub use amf_utils as utils;
