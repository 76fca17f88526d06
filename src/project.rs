//! Build-state snapshot and artifact scope narrowing.
//!
//! A [`Project`] carries the compiled-output directory plus two views on the
//! build's binary dependencies: the *full* set (everything the build has
//! pulled in, build-internal artifacts included) and the *dependency-only*
//! set (what the project declares). Exactly one view is active at a time.
//!
//! Narrowing temporarily makes the dependency-only view active so an
//! on-demand compile step cannot see build-internal artifacts. The previous
//! view is captured in a [`ScopeGuard`] and reinstated when the guard is
//! released - on every exit path, including error paths.

use std::collections::BTreeMap ;
use std::path::{ Path, PathBuf };

/// Identifier of a binary dependency (e.g. `"org.example:codegen:1.2"`).
#[derive( Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash )]
pub struct ArtifactId( String );

impl ArtifactId {
	pub fn new( id: impl Into<String> ) -> Self {
		Self( id.into() )
	}

	#[inline] pub fn as_str( &self ) -> &str { &self.0 }
}

impl std::fmt::Display for ArtifactId {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { write!( f, "{}", self.0 )}
}

impl From<&str> for ArtifactId {
	fn from( id: &str ) -> Self { Self::new( id )}
}

impl From<String> for ArtifactId {
	fn from( id: String ) -> Self { Self( id )}
}

/// Classification of a dependency, used to filter which artifacts
/// participate in a given classpath.
#[derive( Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash )]
pub enum DependencyScope {
	/// Needed to compile the processor source.
	Compile,
	/// Needed on the classpath when the processor runs.
	Runtime,
}

impl std::fmt::Display for DependencyScope {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		match self {
			Self::Compile => write!( f, "compile" ),
			Self::Runtime => write!( f, "runtime" ),
		}
	}
}

/// A named binary dependency with its resolved file on disk.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Artifact {
	id: ArtifactId,
	file: PathBuf,
	scope: DependencyScope,
}

impl Artifact {
	pub fn new( id: impl Into<ArtifactId>, file: impl Into<PathBuf>, scope: DependencyScope ) -> Self {
		Self { id: id.into(), file: file.into(), scope }
	}

	#[inline] pub fn id( &self ) -> &ArtifactId { &self.id }

	#[inline] pub fn file( &self ) -> &Path { &self.file }

	#[inline] pub fn scope( &self ) -> DependencyScope { self.scope }
}

/// The build-state snapshot a resolution runs against.
///
/// Holds the project's compiled-output directory and the active artifact
/// view. Resolutions take `&mut Project`, so the borrow checker serializes
/// narrow/restore sequences against one build state; no lock is needed.
#[derive( Debug )]
pub struct Project {
	output_directory: PathBuf,
	/// Active artifact view. Swapped wholesale by [`Project::narrow`].
	artifacts: BTreeMap<ArtifactId, Artifact>,
	/// The declared, dependency-only view.
	dependency_artifacts: BTreeMap<ArtifactId, Artifact>,
}

impl Project {
	/// Creates a snapshot with the full artifact set active.
	///
	/// `artifacts` is the full set; `dependency_artifacts` the declared
	/// subset that stays visible while narrowed.
	pub fn new(
		output_directory: impl Into<PathBuf>,
		artifacts: impl IntoIterator<Item = Artifact>,
		dependency_artifacts: impl IntoIterator<Item = Artifact>,
	) -> Self {
		Self {
			output_directory: output_directory.into(),
			artifacts: artifacts.into_iter().map(| artifact | ( artifact.id.clone(), artifact )).collect(),
			dependency_artifacts: dependency_artifacts.into_iter().map(| artifact | ( artifact.id.clone(), artifact )).collect(),
		}
	}

	/// Where the build writes compiled processor components.
	#[inline] pub fn output_directory( &self ) -> &Path { &self.output_directory }

	/// The currently active artifact view.
	pub fn artifacts( &self ) -> impl Iterator<Item = &Artifact> {
		self.artifacts.values()
	}

	/// Replaces the active view with the dependency-only view.
	///
	/// The prior view travels inside the returned [`ScopeGuard`] and is
	/// reinstated when the guard drops. Callers that want the restore point
	/// to be visible in the control flow can call [`ScopeGuard::restore`].
	pub fn narrow( &mut self ) -> ScopeGuard<'_> {
		let previous = std::mem::replace( &mut self.artifacts, self.dependency_artifacts.clone() );
		ScopeGuard { project: self, previous: Some( previous )}
	}
}

/// Capture token for a narrowed [`Project`].
///
/// Dereferences to the narrowed project. Dropping the guard reinstates the
/// captured view, so a compile failure cannot leave the build state
/// narrowed for later steps.
#[must_use = "dropping the guard immediately would undo the narrowing"]
#[derive( Debug )]
pub struct ScopeGuard<'p> {
	project: &'p mut Project,
	previous: Option<BTreeMap<ArtifactId, Artifact>>,
}

impl ScopeGuard<'_> {
	/// Reinstates the captured artifact view.
	///
	/// Equivalent to dropping the guard; exists so the restore point reads
	/// explicitly at the pipeline's single exit.
	pub fn restore( self ) {}
}

impl std::ops::Deref for ScopeGuard<'_> {
	type Target = Project ;

	fn deref( &self ) -> &Project { self.project }
}

impl Drop for ScopeGuard<'_> {
	fn drop( &mut self ) {
		if let Some( previous ) = self.previous.take() {
			self.project.artifacts = previous ;
		}
	}
}
