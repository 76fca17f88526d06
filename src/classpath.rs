//! Classpath resolution.
//!
//! Turns a [`Project`] snapshot into the ordered list of locations a
//! processor component may be loaded from: the project's own compiled-output
//! directory first (freshly compiled components land there), then the
//! resolved file of every dependency artifact in the requested scope.

use std::collections::BTreeSet ;
use std::path::PathBuf ;

use nonempty_collections::NEVec ;
use thiserror::Error ;

use crate::project::{ ArtifactId, DependencyScope, Project };

/// Ordered, never-empty classpath. The first location is always the
/// project's compiled-output directory.
pub type ClasspathLocations = NEVec<PathBuf> ;

/// An artifact the dependency resolver pinned to a file on disk.
#[derive( Debug, Clone, PartialEq, Eq, PartialOrd, Ord )]
pub struct ResolvedArtifact {
	id: ArtifactId,
	file: PathBuf,
}

impl ResolvedArtifact {
	pub fn new( id: impl Into<ArtifactId>, file: impl Into<PathBuf> ) -> Self {
		Self { id: id.into(), file: file.into() }
	}

	#[inline] pub fn id( &self ) -> &ArtifactId { &self.id }

	#[inline] pub fn file( &self ) -> &PathBuf { &self.file }

	pub fn into_file( self ) -> PathBuf { self.file }
}

/// Failure reported by a [`DependencyResolver`].
#[derive( Error, Debug )]
pub enum ResolverError {
	#[error( "artifact not found: {0}" )] ArtifactNotFound( ArtifactId ),
	#[error( "{0}" )] Failed( Box<dyn std::error::Error + Send + Sync> ),
}

/// External collaborator that resolves the artifacts of a dependency scope
/// for the active build state.
///
/// Implementations belong to the surrounding build tool; [`ProjectResolver`]
/// is the self-contained default. Errors are wrapped by the caller into
/// [`ResolutionError::Resolver`], never suppressed.
pub trait DependencyResolver {
	fn resolve(
		&self,
		project: &Project,
		scopes: &[DependencyScope],
	) -> Result<BTreeSet<ResolvedArtifact>, ResolverError> ;
}

/// Resolves from the project's active artifact view, filtered by scope.
#[derive( Debug, Default )]
pub struct ProjectResolver ;

impl DependencyResolver for ProjectResolver {
	fn resolve(
		&self,
		project: &Project,
		scopes: &[DependencyScope],
	) -> Result<BTreeSet<ResolvedArtifact>, ResolverError> {
		Ok( project.artifacts()
			.filter(| artifact | scopes.contains( &artifact.scope() ))
			.map(| artifact | ResolvedArtifact::new( artifact.id().clone(), artifact.file() ))
			.collect() )
	}
}

/// Why a classpath could not be built.
#[derive( Error, Debug )]
pub enum ResolutionError {
	#[error( "failed to resolve {scope} dependencies: {source}" )]
	Resolver { scope: DependencyScope, source: ResolverError },
	#[error( "artifact {id} resolved to a missing file: {path}" )]
	MissingArtifactFile { id: ArtifactId, path: PathBuf },
}

/// Builds the runtime-scope classpath for `project`.
///
/// Fails if resolution itself fails or any resolved artifact file is absent
/// from disk. The output directory is not required to exist yet; it only
/// has to be searched first once it does.
pub fn runtime_classpath(
	project: &Project,
	resolver: &dyn DependencyResolver,
) -> Result<ClasspathLocations, ResolutionError> {
	let scope = DependencyScope::Runtime ;
	let artifacts = resolver
		.resolve( project, &[ scope ])
		.map_err(| source | ResolutionError::Resolver { scope, source })?;

	let mut locations = NEVec::new( project.output_directory().to_path_buf() );
	for artifact in artifacts {
		if !artifact.file().exists() {
			return Err( ResolutionError::MissingArtifactFile {
				id: artifact.id().clone(),
				path: artifact.into_file(),
			});
		}
		locations.push( artifact.into_file() );
	}
	Ok( locations )
}
