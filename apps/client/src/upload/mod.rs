// Resume upload: file validation and the form state that feeds the analysis
// orchestrator. Browser-style file and drag events arrive as `FileEvent`s so
// the state machine does not depend on a particular front end.

pub mod form;
pub mod validator;
