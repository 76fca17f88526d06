//! The external compile step.
//!
//! Compilation is a black box to the host: given a source file and a
//! language-version pair, something produces a processor component in the
//! project's output directory, or fails with diagnostics. [`CompileStep`] is
//! that contract; [`CommandCompiler`] is the production implementation that
//! shells out to a versioned compiler binary.

use std::path::{ Path, PathBuf };
use std::process::Command ;

use pipe_trait::Pipe ;
use thiserror::Error ;

use crate::loader::COMPONENT_EXTENSION ;
use crate::project::Project ;
use crate::resource::Resource ;

/// Everything one compile invocation needs.
///
/// The output path is derived from the processor name: name converted to a
/// source-relative path under the project's output directory, with the
/// component extension appended.
#[derive( Debug, Clone )]
pub struct CompileRequest {
	source_file: PathBuf,
	output_path: PathBuf,
	source_version: String,
	target_version: String,
	compiler_version: String,
}

impl CompileRequest {
	pub(crate) fn for_resource( resource: &Resource, project: &Project ) -> Self {
		Self {
			source_file: resource.source_file().to_path_buf(),
			output_path: resource.name()
				.relative_path( COMPONENT_EXTENSION )
				.pipe(| relative | project.output_directory().join( relative )),
			source_version: resource.source_version().to_string(),
			target_version: resource.target_version().to_string(),
			compiler_version: resource.compiler_version().to_string(),
		}
	}

	#[inline] pub fn source_file( &self ) -> &Path { &self.source_file }

	/// Where the compiled component must land for the reload to find it.
	#[inline] pub fn output_path( &self ) -> &Path { &self.output_path }

	#[inline] pub fn source_version( &self ) -> &str { &self.source_version }

	#[inline] pub fn target_version( &self ) -> &str { &self.target_version }

	#[inline] pub fn compiler_version( &self ) -> &str { &self.compiler_version }
}

/// Why an external compilation failed.
#[derive( Error, Debug )]
pub enum CompileError {
	#[error( "failed to start compiler `{program}`: {source}" )]
	Spawn { program: String, source: std::io::Error },
	#[error( "compilation of {path} failed:\n{diagnostics}" )]
	Failed { path: PathBuf, code: Option<i32>, diagnostics: String },
}

/// External collaborator performing a single compilation.
///
/// Invoked with the project's artifact view narrowed to declared
/// dependencies, so the compiled unit only sees its legitimate classpath.
/// Exactly one attempt is made per resolution; compilation is assumed
/// deterministic and is never retried.
pub trait CompileStep {
	fn compile( &mut self, project: &Project, request: &CompileRequest ) -> Result<(), CompileError> ;
}

/// Runs an external compiler executable.
///
/// The binary is selected by the versioned-binary convention: a base program
/// `stencilc` with compiler version `3.0` runs `stencilc-3.0`. Arguments:
///
/// ```text
/// <program>-<version> --source <v> --target <v> -o <output> [--dep <file>]... <source>
/// ```
///
/// One `--dep` is passed per artifact visible on the (narrowed) project, so
/// the compiler resolves imports only against declared dependencies.
/// Captured stderr becomes the failure diagnostics.
#[derive( Debug, Clone )]
pub struct CommandCompiler {
	program: String,
}

impl CommandCompiler {
	pub fn new( program: impl Into<String> ) -> Self {
		Self { program: program.into() }
	}

	fn versioned_program( &self, request: &CompileRequest ) -> String {
		format!( "{}-{}", self.program, request.compiler_version() )
	}
}

impl CompileStep for CommandCompiler {
	fn compile( &mut self, project: &Project, request: &CompileRequest ) -> Result<(), CompileError> {
		let program = self.versioned_program( request );

		let mut command = Command::new( &program );
		command
			.arg( "--source" ).arg( request.source_version() )
			.arg( "--target" ).arg( request.target_version() )
			.arg( "-o" ).arg( request.output_path() );
		for artifact in project.artifacts() {
			command.arg( "--dep" ).arg( artifact.file() );
		}
		command.arg( request.source_file() );

		let output = command.output()
			.map_err(| source | CompileError::Spawn { program, source })?;
		match output.status.success() {
			true => Ok(()),
			false => Err( CompileError::Failed {
				path: request.source_file.clone(),
				code: output.status.code(),
				diagnostics: String::from_utf8_lossy( &output.stderr ).into_owned(),
			}),
		}
	}
}
