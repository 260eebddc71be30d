//! Entity structs for all survey domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `survey-db/migrations/001_initial.sql`). The `New*` structs are the
//! creation payloads accepted over HTTP; ids are assigned by the store.

mod clause;
mod organization;
mod question;
mod response;

pub use clause::{Clause, NewClause};
pub use organization::{NewOrganization, Organization};
pub use question::{NewQuestion, Question};
pub use response::{NewResponse, Response};
