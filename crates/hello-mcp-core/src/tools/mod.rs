//! Server-side tools
//!
//! ```text
//! ToolSpec + handler ──register──▶ ToolRegistry ──list()──────▶ tools/list
//!                                        │
//!                                        └──dispatch()──▶ ParameterSchema::bind ──▶ handler
//! ```
//!
//! The bundled tools look up records in a static periodic table.

mod schema;
mod registry;
mod elements;
pub mod periodic_table;

pub use schema::{ArgValue, BindError, BoundArguments, ParamKind, ParameterField, ParameterSchema};
pub use registry::{
    DispatchError, DispatchResult, ToolFailure, ToolHandler, ToolRegistry, ToolSpec,
};
pub use elements::{element_registry, register_element_tools, GET_ELEMENT, GET_ELEMENT_BY_POSITION};
