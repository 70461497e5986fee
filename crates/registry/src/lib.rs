//! Variable registry for Cirrus.
//!
//! Every allocated simulation field of a grid is registered here with its
//! storage, point count, [`DimClass`] and [`IntentFlags`]. The output/sync
//! driver reads the registry to decide what to serialize and what to
//! halo-exchange; it never learns about fields any other way.
//!
//! Storage is owned by the physics module that allocated it. The registry
//! holds weak references only, and optional fields go through
//! [`OptionalField`] so registration follows allocation.

pub mod descriptor;
pub mod dim;
pub mod error;
pub mod field;
pub mod intent;
pub mod registry;
pub mod slot;

pub use descriptor::{FieldDescriptor, parse_table};
pub use dim::{DimClass, GridDims, Layout};
pub use error::{DescriptorError, RegistryError};
pub use field::{Field, FieldRef, MeanAccumulator, MeanBuffer, MeanRef};
pub use intent::{ExchangeClass, Intent, IntentFlags};
pub use registry::{MAX_FIELD_NAME_LEN, RegisterAction, RegistryEntry, VariableRegistry};
pub use slot::{Allocated, OptionalField};
