//! A build-time plugin host for template-driven code generation.
//!
//! A build declares a named **resource** to be generated by a user-supplied
//! *processor*. `stencil_host` resolves that processor against the project's
//! compiled output and its dependency artifacts, compiles it through an
//! external compile step if it is not there yet, loads it in an isolated
//! context, and runs it against a template engine and an output location.
//!
//! Processors are WebAssembly components: separately compiled units exporting
//! the [`PROCESSOR_INTERFACE`] (`set-output-directory`, `set-resource-file`,
//! `process`) and optionally importing the [`HOST_INTERFACE`] for logging,
//! template rendering and file output.
//!
//! # Core Concepts
//!
//! - [`Resource`]: the declarative record for one generation task - processor
//! 	name, resource file, output/template directories, compilation policy.
//! 	[`Resource::generate`] is the driver entry point.
//!
//! - [`Project`]: the build-state snapshot - the compiled-output directory and
//! 	the active view of the build's dependency [`Artifact`]s. Narrowing the
//! 	view ([`Project::narrow`]) hides build-internal artifacts from the
//! 	compile step; the [`ScopeGuard`] restores the previous view on every
//! 	exit path.
//!
//! - [`ResolutionPipeline`]: the resolve -> compile -> reload orchestrator.
//! 	A processor found on the classpath is loaded directly; a missing one is
//! 	compiled exactly once via [`CompileStep`] and reloaded in a fresh
//! 	context.
//!
//! - [`LoadedProcessor`]: a live processor instance; constructed, configured
//! 	and run by [`invoke`], then discarded.
//!
//! # Isolation
//!
//! Every load builds a new loading context (its own [`Engine`]); nothing is
//! cached across attempts. Components loaded on different attempts are never
//! identity-equal - that is deliberate, it is what makes a freshly compiled
//! component visible on the reload. Isolation here is for correctness, not
//! security: no fuel, deadlines or memory limits are imposed on processors.
//!
//! # Concurrency
//!
//! Resolution is single-threaded and synchronous. The pipeline borrows the
//! [`Project`] mutably, so two resolutions against the same build state
//! cannot interleave their narrow/restore sequences; sequence multiple
//! resources one after another.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc ;
//! use stencil_host::{
//! 	Artifact, CommandCompiler, DependencyScope, Project, ProjectResolver,
//! 	Resource, TemplateEngine, TemplateError, TracingLogger,
//! };
//!
//! // The template engine is the outer driver's business; anything that can
//! // render a named template works.
//! struct Literal ;
//!
//! impl TemplateEngine for Literal {
//! 	fn render( &mut self, template: &str, _attributes: &[( String, String )] ) -> Result<String, TemplateError> {
//! 		Ok( template.to_string() )
//! 	}
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Artifact::new( "org.example:model:1.0", "deps/model.wasm", DependencyScope::Runtime );
//! let mut project = Project::new(
//! 	"target/components",
//! 	vec![ model.clone() ],
//! 	vec![ model ],
//! );
//!
//! let resource = Resource::new( "gen.Foo", "gen/Foo.src", "target/generated", "templates" )
//! 	.with_compiler_version( "3.0" );
//!
//! // Loads target/components/gen/Foo.wasm, or compiles gen/Foo.src with
//! // `stencilc-3.0` first, then configures the processor and runs it.
//! resource.generate(
//! 	&mut project,
//! 	&ProjectResolver,
//! 	&mut CommandCompiler::new( "stencilc" ),
//! 	Arc::new( TracingLogger ),
//! 	Box::new( Literal ),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Re-exports
//!
//! `stencil_host` re-exports [`Engine`], [`Component`] and [`Val`] from
//! `wasmtime` for convenience; see the
//! [wasmtime docs](https://docs.rs/wasmtime/latest/wasmtime/) for details.

mod classpath ;
mod compile ;
mod host ;
mod invoker ;
mod loader ;
mod pipeline ;
mod project ;
mod resource ;

#[doc( no_inline )]
pub use wasmtime::Engine ;
#[doc( no_inline )]
pub use wasmtime::component::{ Component, Val };

pub use classpath::{
	runtime_classpath, ClasspathLocations, DependencyResolver, ProjectResolver,
	ResolutionError, ResolvedArtifact, ResolverError,
};
pub use compile::{ CommandCompiler, CompileError, CompileRequest, CompileStep };
pub use host::{ HostContext, Logger, TemplateEngine, TemplateError, TracingLogger };
pub use invoker::{ invoke, InvokeError, LoadedProcessor };
pub use loader::{ load, LoadError, LoadedComponent, COMPONENT_EXTENSION, HOST_INTERFACE, PROCESSOR_INTERFACE };
pub use pipeline::{ ResolutionPipeline, ResolveError };
pub use project::{ Artifact, ArtifactId, DependencyScope, Project, ScopeGuard };
pub use resource::{
	Cause, Error, ProcessorName, Resource,
	DEFAULT_COMPILER_VERSION, DEFAULT_LANGUAGE_VERSION,
};
