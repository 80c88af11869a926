//! Session access control: status checks, ownership and origin allow-listing.

pub mod guard;

pub use guard::{
    can_user_continue_simulation, validate_simulation_status, validate_user_in_session,
    SessionGuard,
};
