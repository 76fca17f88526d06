//! Processor component loading.
//!
//! [`load`] materializes a named processor from a classpath. Every call
//! builds a fresh, isolated loading context (a new [`Engine`]); nothing is
//! cached or reused across calls. A component loaded after a compile attempt
//! is therefore never identity-equal to one seen during an earlier failed
//! attempt - that is what lets freshly compiled components take effect, and
//! callers must not rely on identity across loads.
//!
//! The only thing every loading context shares is the host interface
//! ([`HOST_INTERFACE`]): logger, template engine and file output are always
//! provided by the invoking process, the way a JVM child class loader falls
//! back to its parent for framework types.

use std::path::{ Path, PathBuf };

use itertools::Itertools ;
use thiserror::Error ;
use wasmtime::Engine ;
use wasmtime::component::Component ;

use crate::classpath::ClasspathLocations ;
use crate::resource::ProcessorName ;

/// Interface a processor component must export.
pub const PROCESSOR_INTERFACE: &str = "stencil:processor/processor" ;
/// Interface every loading context provides to the guest.
pub const HOST_INTERFACE: &str = "stencil:processor/host" ;
/// Extension of compiled processor components.
pub const COMPONENT_EXTENSION: &str = "wasm" ;

/// A processor component bound to the loading context that produced it.
///
/// The engine is the load's isolation boundary; it lives exactly as long as
/// this value and is what the invoker instantiates against.
pub struct LoadedComponent {
	engine: Engine,
	component: Component,
	path: PathBuf,
}

impl LoadedComponent {
	#[inline] pub fn engine( &self ) -> &Engine { &self.engine }

	#[inline] pub fn component( &self ) -> &Component { &self.component }

	/// The classpath location the component was loaded from.
	#[inline] pub fn path( &self ) -> &Path { &self.path }
}

impl std::fmt::Debug for LoadedComponent {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "LoadedComponent" )
			.field( "component", &"<Component>" )
			.field( "path", &self.path )
			.finish_non_exhaustive()
	}
}

/// Why a processor could not be materialized from a classpath.
#[derive( Error, Debug )]
pub enum LoadError {
	/// Absent from every location. The pipeline's compile fallback keys on
	/// this variant specifically.
	#[error( "unable to find the processor component {name} (searched: {searched})" )]
	NotFound { name: ProcessorName, searched: String },
	/// Present but not a loadable component - not grounds for a compile
	/// attempt, the file is there and broken.
	#[error( "invalid processor component at {path}: {source}" )]
	InvalidComponent { path: PathBuf, source: wasmtime::Error },
}

/// Searches `locations` in order and loads `name` in a fresh context.
///
/// Directory locations are searched by the name's relative path
/// (`gen.Foo` -> `gen/Foo.wasm`); file locations (dependency artifacts that
/// are themselves components) match on `<simple-name>.wasm`. The first hit
/// wins, so the project's own output shadows dependency artifacts.
pub fn load( locations: &ClasspathLocations, name: &ProcessorName ) -> Result<LoadedComponent, LoadError> {
	let Some( path ) = locate( locations, name ) else {
		return Err( LoadError::NotFound {
			name: name.clone(),
			searched: locations.nonempty_iter().into_iter().map(| location | location.display().to_string() ).join( ", " ),
		});
	};

	let engine = Engine::default();
	let component = Component::from_file( &engine, &path )
		.map_err(| source | LoadError::InvalidComponent { path: path.clone(), source })?;
	Ok( LoadedComponent { engine, component, path })
}

fn locate( locations: &ClasspathLocations, name: &ProcessorName ) -> Option<PathBuf> {
	let relative = name.relative_path( COMPONENT_EXTENSION );
	let file_name = format!( "{}.{}", name.simple_name(), COMPONENT_EXTENSION );

	locations.nonempty_iter().into_iter().find_map(| location | {
		if location.is_dir() {
			let candidate = location.join( &relative );
			return candidate.is_file().then_some( candidate );
		}
		match location.file_name().is_some_and(| found | found == std::ffi::OsStr::new( &file_name )) {
			true if location.is_file() => Some( location.clone() ),
			_ => None,
		}
	})
}
