use async_trait::async_trait;
use radi_model::PropertySet;

use crate::ExecResult;

/// A named unit of work configured through its property set.
///
/// Callers project [`Operation::properties`] onto a flag surface, resolve the parsed flags back
/// through [`Operation::properties_mut`], then call [`Operation::execute`]. The `context`
/// property, when the operation declares one, is its only cancellation and deadline signal.
#[async_trait]
pub trait Operation: Send + Sync {
    fn id(&self) -> &str;

    fn description(&self) -> &str;

    fn properties(&self) -> &PropertySet;

    fn properties_mut(&mut self) -> &mut PropertySet;

    /// Run the operation. `args` are the positional arguments left after flag parsing.
    async fn execute(&self, args: &[String]) -> ExecResult<()>;
}
