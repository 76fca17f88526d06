//! Host-side collaborators and the `stencil:processor/host` interface.
//!
//! Processor components are sandboxed: they have no filesystem and no log
//! sink of their own. Everything they need from the invoking process crosses
//! this interface - a logger, the (opaque) template engine, and file output
//! rooted at the configured output directory.

use std::path::PathBuf ;
use thiserror::Error ;
use wasmtime::StoreContextMut ;
use wasmtime::component::{ Linker, Val };

use crate::loader::HOST_INTERFACE ;

/// Log sink handed through to the processor, mirroring the build tool's own
/// logger. Implementations must tolerate concurrent use (`&self` methods).
pub trait Logger: Send + Sync {
	fn info( &self, message: &str );
	fn warn( &self, message: &str );
	fn error( &self, message: &str );
}

/// [`Logger`] backed by the `tracing` macros.
#[derive( Debug, Default )]
pub struct TracingLogger ;

impl Logger for TracingLogger {
	fn info( &self, message: &str ) { tracing::info!( "{}", message ); }
	fn warn( &self, message: &str ) { tracing::warn!( "{}", message ); }
	fn error( &self, message: &str ) { tracing::error!( "{}", message ); }
}

/// A template failed to render.
#[derive( Error, Debug )]
#[error( "template {template} failed to render: {message}" )]
pub struct TemplateError {
	pub template: String,
	pub message: String,
}

/// The template engine a processor renders with.
///
/// Opaque to the host: it is constructed by the outer driver (typically from
/// the resource's template directory) and passed through unmodified. The
/// guest reaches it via the `render` host import.
pub trait TemplateEngine: Send {
	fn render(
		&mut self,
		template: &str,
		attributes: &[( String, String )],
	) -> Result<String, TemplateError> ;
}

/// Store data for one processor instantiation.
///
/// Configured by the invoker before `process()` runs; consulted by the host
/// import implementations while it runs.
#[derive( Default )]
pub struct HostContext {
	pub(crate) logger: Option<std::sync::Arc<dyn Logger>>,
	pub(crate) template_engine: Option<Box<dyn TemplateEngine>>,
	pub(crate) output_directory: Option<PathBuf>,
	pub(crate) resource_file: Option<PathBuf>,
}

impl std::fmt::Debug for HostContext {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "HostContext" )
			.field( "logger", &self.logger.as_ref().map(| _ | "<Logger>" ))
			.field( "template_engine", &self.template_engine.as_ref().map(| _ | "<TemplateEngine>" ))
			.field( "output_directory", &self.output_directory )
			.field( "resource_file", &self.resource_file )
			.finish()
	}
}

/// Adds the host interface to a fresh linker.
///
/// Defined unconditionally; components that do not import it are unaffected.
pub(crate) fn add_to_linker( linker: &mut Linker<HostContext> ) -> Result<(), wasmtime::Error> {
	let mut root = linker.root();
	let mut host = root.instance( HOST_INTERFACE )?;

	host.func_new( "log", | ctx: StoreContextMut<'_, HostContext>, _ty, args, _results | {
		let [ Val::String( level ), Val::String( message ) ] = args else {
			return Err( wasmtime::Error::msg( "log: expected (level: string, message: string)" ));
		};
		if let Some( logger ) = ctx.data().logger.as_ref() {
			match level.as_str() {
				"error" => logger.error( message ),
				"warn" => logger.warn( message ),
				_ => logger.info( message ),
			}
		}
		Ok(())
	})?;

	host.func_new( "render", | mut ctx: StoreContextMut<'_, HostContext>, _ty, args, results | {
		let [ Val::String( template ), Val::List( attributes ) ] = args else {
			return Err( wasmtime::Error::msg( "render: expected (template: string, attributes: list<tuple<string, string>>)" ));
		};
		let attributes = attributes.iter()
			.map(| entry | match entry {
				Val::Tuple( pair ) => match pair.as_slice() {
					[ Val::String( key ), Val::String( value ) ] => Ok(( key.clone(), value.clone() )),
					_ => Err( wasmtime::Error::msg( "render: attribute tuples must be (string, string)" )),
				},
				_ => Err( wasmtime::Error::msg( "render: attributes must be tuples" )),
			})
			.collect::<Result<Vec<_>, _>>()?;

		let engine = ctx.data_mut().template_engine.as_mut()
			.ok_or_else(|| wasmtime::Error::msg( "render: no template engine configured" ))?;
		let rendered = engine.render( template, &attributes )?;
		results[0] = Val::String( rendered );
		Ok(())
	})?;

	host.func_new( "write-file", | ctx: StoreContextMut<'_, HostContext>, _ty, args, _results | {
		let [ Val::String( path ), Val::String( contents ) ] = args else {
			return Err( wasmtime::Error::msg( "write-file: expected (path: string, contents: string)" ));
		};
		let root = ctx.data().output_directory.as_ref()
			.ok_or_else(|| wasmtime::Error::msg( "write-file: no output directory configured" ))?;
		let target = root.join( path );
		if let Some( parent ) = target.parent() {
			std::fs::create_dir_all( parent )?;
		}
		std::fs::write( &target, contents )?;
		Ok(())
	})?;

	Ok(())
}
