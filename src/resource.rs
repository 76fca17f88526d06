//! Resource descriptors.
//!
//! A [`Resource`] is the declarative record for one generation task: which
//! processor to run, the resource file it reads, where generated output
//! goes, and the compilation policy applied when the processor component is
//! not yet on the classpath. Descriptors come from the build's configuration
//! layer and are immutable once built.

use std::path::{ Path, PathBuf };
use std::sync::Arc ;
use thiserror::Error ;

use crate::compile::CompileStep ;
use crate::classpath::DependencyResolver ;
use crate::host::{ Logger, TemplateEngine };
use crate::invoker ;
use crate::pipeline::{ ResolutionPipeline, ResolveError };
use crate::project::Project ;

/// Default source/target language version when the build declares none.
pub const DEFAULT_LANGUAGE_VERSION: &str = "1.6" ;
/// Default external compiler version when the build declares none.
pub const DEFAULT_COMPILER_VERSION: &str = "3.0" ;

/// Dotted binary name of a processor component, e.g. `gen.Foo`.
///
/// The name doubles as a classpath-relative location: dots become path
/// separators and the component extension is appended, so `gen.Foo` is
/// looked up (and compiled to) `gen/Foo.wasm`.
#[derive( Debug, Clone, PartialEq, Eq, Hash )]
pub struct ProcessorName( String );

impl ProcessorName {
	pub fn new( name: impl Into<String> ) -> Self {
		Self( name.into() )
	}

	#[inline] pub fn as_str( &self ) -> &str { &self.0 }

	/// The last dotted segment (`gen.Foo` -> `Foo`).
	pub fn simple_name( &self ) -> &str {
		self.0.rsplit( '.' ).next().unwrap_or( &self.0 )
	}

	/// Converts the name to a source-relative path with `extension` appended.
	pub fn relative_path( &self, extension: &str ) -> PathBuf {
		let mut path: PathBuf = self.0.split( '.' ).collect();
		path.set_extension( extension );
		path
	}
}

impl std::fmt::Display for ProcessorName {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { write!( f, "{}", self.0 )}
}

impl From<&str> for ProcessorName {
	fn from( name: &str ) -> Self { Self::new( name )}
}

impl From<String> for ProcessorName {
	fn from( name: String ) -> Self { Self( name )}
}

/// One declared generation task.
#[derive( Debug, Clone )]
pub struct Resource {
	name: ProcessorName,
	source_file: PathBuf,
	output_directory: PathBuf,
	template_directory: PathBuf,
	compile: bool,
	source_version: String,
	target_version: String,
	compiler_version: String,
}

impl Resource {
	/// Creates a descriptor with the default compilation policy
	/// (compilation enabled, language versions "1.6", compiler "3.0").
	pub fn new(
		name: impl Into<ProcessorName>,
		source_file: impl Into<PathBuf>,
		output_directory: impl Into<PathBuf>,
		template_directory: impl Into<PathBuf>,
	) -> Self {
		Self {
			name: name.into(),
			source_file: source_file.into(),
			output_directory: output_directory.into(),
			template_directory: template_directory.into(),
			compile: true,
			source_version: DEFAULT_LANGUAGE_VERSION.to_string(),
			target_version: DEFAULT_LANGUAGE_VERSION.to_string(),
			compiler_version: DEFAULT_COMPILER_VERSION.to_string(),
		}
	}

	/// Whether the host may compile the processor when it is missing.
	pub fn with_compile( mut self, compile: bool ) -> Self {
		self.compile = compile ;
		self
	}

	pub fn with_source_version( mut self, version: impl Into<String> ) -> Self {
		self.source_version = version.into();
		self
	}

	pub fn with_target_version( mut self, version: impl Into<String> ) -> Self {
		self.target_version = version.into();
		self
	}

	/// Selects the external compiler version (versioned-binary convention,
	/// see [`CommandCompiler`]( crate::CommandCompiler )).
	pub fn with_compiler_version( mut self, version: impl Into<String> ) -> Self {
		self.compiler_version = version.into();
		self
	}

	#[inline] pub fn name( &self ) -> &ProcessorName { &self.name }

	/// The resource file handed to the processor, and the source compiled
	/// when the processor is missing from the classpath.
	#[inline] pub fn source_file( &self ) -> &Path { &self.source_file }

	/// Where the processor writes generated files.
	#[inline] pub fn output_directory( &self ) -> &Path { &self.output_directory }

	/// Template root for the engine the outer driver constructs.
	#[inline] pub fn template_directory( &self ) -> &Path { &self.template_directory }

	#[inline] pub fn compile( &self ) -> bool { self.compile }

	#[inline] pub fn source_version( &self ) -> &str { &self.source_version }

	#[inline] pub fn target_version( &self ) -> &str { &self.target_version }

	#[inline] pub fn compiler_version( &self ) -> &str { &self.compiler_version }

	/// Resolves the processor and runs it.
	///
	/// The whole resolve -> compile -> reload -> invoke pipeline, followed by
	/// configuration and `process()`. Every failure surfaces as a single
	/// [`Error`] naming this resource's processor; nothing is downgraded to
	/// a warning.
	pub fn generate(
		&self,
		project: &mut Project,
		resolver: &dyn DependencyResolver,
		compiler: &mut dyn CompileStep,
		logger: Arc<dyn Logger>,
		template_engine: Box<dyn TemplateEngine>,
	) -> Result<(), Error> {
		let wrap = | source: Cause | Error { name: self.name.clone(), source };
		let loaded = ResolutionPipeline::new( project, resolver, compiler, Arc::clone( &logger ))
			.resolve( self )
			.map_err(| source | wrap( Cause::Resolve( source )))?;
		invoker::invoke( &loaded, self, logger, template_engine )
			.map_err(| source | wrap( Cause::Invoke( source )))
	}
}

/// Single user-facing failure for one generation task.
#[derive( Error, Debug )]
#[error( "unable to run processor {name}: {source}" )]
pub struct Error {
	name: ProcessorName,
	source: Cause,
}

impl Error {
	#[inline] pub fn name( &self ) -> &ProcessorName { &self.name }

	#[inline] pub fn cause( &self ) -> &Cause { &self.source }
}

/// What stage of a generation task failed.
#[derive( Error, Debug )]
pub enum Cause {
	#[error( transparent )] Resolve( #[from] ResolveError ),
	#[error( transparent )] Invoke( #[from] crate::invoker::InvokeError ),
}
