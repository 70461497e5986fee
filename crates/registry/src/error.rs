/// Error parsing or validating a field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
	#[error("descriptor '{0}': expected 'NAME : code : token...'")]
	Shape(String),

	#[error("descriptor '{descriptor}': unknown dimension code '{code}'")]
	UnknownDim { descriptor: String, code: String },

	#[error("descriptor '{descriptor}': unknown intent token '{token}'")]
	UnknownToken { descriptor: String, token: String },

	#[error("descriptor '{descriptor}': intent token '{token}' given twice")]
	RepeatedToken { descriptor: String, token: String },

	#[error("field {0} is declared more than once in one descriptor table")]
	DuplicateField(String),

	#[error(transparent)]
	Name(#[from] RegistryError),
}

/// Error registering a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("field name must not be empty")]
	EmptyName,

	#[error("field name {name} is longer than {max} characters")]
	NameTooLong { name: String, max: usize },

	#[error("field {name}: declared {declared} points but storage holds {actual}")]
	LengthMismatch { name: String, declared: usize, actual: usize },

	#[error("field {0} is time-averaged but no accumulator was supplied")]
	MissingAccumulator(String),

	#[error("field {0} has an accumulator but is not marked time-averaged")]
	UnexpectedAccumulator(String),

	#[error("grid {grid}: field {name} refers to released storage")]
	Dangling { grid: usize, name: String },
}
