//! The input protocols that jmxplot must parse. These modules are used by the
//! sources to do their work.

pub mod jmx;
