//! Algorithm implementations for vital-sign processing
//!
//! This module contains the classification and scoring algorithms applied to
//! vital-sign readings supplied by the data layer.

pub mod vitals;
