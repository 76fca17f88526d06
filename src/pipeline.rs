//! The resolve -> compile -> reload pipeline.
//!
//! [`ResolutionPipeline::resolve`] decides whether a processor component
//! already exists on the runtime classpath, falls back to exactly one
//! external compile attempt when it does not (and the resource allows it),
//! and produces a loadable component or a typed failure. The project's
//! artifact view is narrowed for the compile/reload leg and restored on
//! every way out.

use std::sync::Arc ;
use thiserror::Error ;

use crate::classpath::{ self, DependencyResolver, ResolutionError };
use crate::compile::{ CompileError, CompileRequest, CompileStep };
use crate::host::Logger ;
use crate::loader::{ self, LoadError, LoadedComponent };
use crate::project::Project ;
use crate::resource::{ ProcessorName, Resource };

/// Terminal failure of a resolution.
#[derive( Error, Debug )]
pub enum ResolveError {
	/// Not on the classpath and the resource forbids compiling it.
	#[error( "the processor {0} is not on the classpath, and compilation is not enabled" )]
	CompilationDisabled( ProcessorName ),
	/// The classpath itself could not be built.
	#[error( transparent )] Resolution( #[from] ResolutionError ),
	/// Loading failed - on the first attempt or after a compile.
	#[error( transparent )] Load( #[from] LoadError ),
	/// The external compile step failed; carries its diagnostics.
	#[error( "compilation of processor {name} failed: {source}" )]
	Compile { name: ProcessorName, source: CompileError },
}

/// One resolution run against one build state.
///
/// Holding `&mut Project` statically serializes concurrent resolutions
/// against the same build state; the narrow/restore pair in
/// [`compile_and_reload`]( Self::resolve ) can never interleave with
/// another pipeline's.
pub struct ResolutionPipeline<'a> {
	project: &'a mut Project,
	resolver: &'a dyn DependencyResolver,
	compiler: &'a mut dyn CompileStep,
	logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for ResolutionPipeline<'_> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ResolutionPipeline" )
			.field( "project", &self.project )
			.finish_non_exhaustive()
	}
}

impl<'a> ResolutionPipeline<'a> {
	pub fn new(
		project: &'a mut Project,
		resolver: &'a dyn DependencyResolver,
		compiler: &'a mut dyn CompileStep,
		logger: Arc<dyn Logger>,
	) -> Self {
		Self { project, resolver, compiler, logger }
	}

	/// Resolves `resource` to a loadable processor component.
	///
	/// Direct load first. Only a clean not-found triggers the compile
	/// fallback; every other failure (resolution errors, a present but
	/// broken component) fails the pipeline as-is. With compilation
	/// disabled, not-found fails immediately.
	pub fn resolve( &mut self, resource: &Resource ) -> Result<LoadedComponent, ResolveError> {
		match Self::load_from( self.project, self.resolver, resource.name() ) {
			Err( ResolveError::Load( LoadError::NotFound { .. } )) if resource.compile() => {
				self.logger.info( &format!(
					"Unable to find the processor {}. Attempting to compile it...", resource.name(),
				));
				self.compile_and_reload( resource )
			}
			Err( ResolveError::Load( LoadError::NotFound { .. } )) =>
				Err( ResolveError::CompilationDisabled( resource.name().clone() )),
			other => other,
		}
	}

	/// The compile/reload leg. The narrowed scope spans the compile step
	/// and the reload, and `restore` runs exactly once whichever way this
	/// returns (the guard would also fire on an unwind).
	fn compile_and_reload( &mut self, resource: &Resource ) -> Result<LoadedComponent, ResolveError> {
		let request = CompileRequest::for_resource( resource, self.project );
		self.logger.info( &format!( "Compiling {}...", request.source_file().display() ));

		let narrowed = self.project.narrow();
		let result = self.compiler
			.compile( &narrowed, &request )
			.map_err(| source | ResolveError::Compile { name: resource.name().clone(), source })
			.and_then(|()| Self::load_from( &narrowed, self.resolver, resource.name() ));
		narrowed.restore();
		result
	}

	/// One classpath + load attempt. A fresh loading context per call, so a
	/// component compiled after a failed attempt is visible on the retry.
	fn load_from(
		project: &Project,
		resolver: &dyn DependencyResolver,
		name: &ProcessorName,
	) -> Result<LoadedComponent, ResolveError> {
		let locations = classpath::runtime_classpath( project, resolver )?;
		loader::load( &locations, name ).map_err( ResolveError::from )
	}
}
