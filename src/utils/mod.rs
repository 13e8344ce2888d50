pub mod normalization;

pub use normalization::Normalization;
