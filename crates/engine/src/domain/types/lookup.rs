/// Outcome of a typed scalar read from a policy store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Present(T),
    Absent,
    /// The value exists but does not have the requested type.
    WrongType,
}
