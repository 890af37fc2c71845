// Authentication: bearer-token session state machine, token persistence, and
// the controller that resolves identities against `/api/users/me`.

pub mod controller;
pub mod session;
pub mod store;
