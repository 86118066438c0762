pub mod fields;
pub mod session;

pub use fields::{form_schema, FieldDescriptor, FieldKey, FieldRecord};
pub use session::{FormSession, FormState};
