mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::PropertyKind;

mod value;
pub use value::PropertyValue;

mod stream;
pub use stream::{
    InputStream, MemoryStreams, OutputStream, ProcessStreams, STDERR, STDIN, STDOUT, Streams,
};

mod context;
pub use context::OperationContext;

mod property;
pub use property::Property;

mod set;
pub use set::PropertySet;
