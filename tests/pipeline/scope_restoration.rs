use std::path::Path ;
use std::sync::Arc ;

use stencil_host::{
	Artifact, DependencyScope, LoadError, Project, ProjectResolver,
	ResolutionPipeline, ResolveError, Resource,
};

use crate::harness::{ RecordingCompiler, RecordingLogger, VALID_PROCESSOR };

const DECLARED: &str = "org.example:model:1.0" ;
const INTERNAL: &str = "build.internal:processors:0.0" ;

/// Full view carries a build-internal artifact on top of the declared
/// dependency; the dependency view carries the declared one only.
fn project_with_internal_artifact( dir: &Path ) -> Project {
	let declared_file = dir.join( "model.wasm" );
	let internal_file = dir.join( "internal.wasm" );
	std::fs::write( &declared_file, "stub" ).unwrap();
	std::fs::write( &internal_file, "stub" ).unwrap();

	let declared = Artifact::new( DECLARED, declared_file, DependencyScope::Runtime );
	let internal = Artifact::new( INTERNAL, internal_file, DependencyScope::Runtime );
	Project::new(
		dir.join( "components" ),
		vec![ declared.clone(), internal ],
		vec![ declared ],
	)
}

fn resource_in( dir: &Path ) -> Resource {
	Resource::new(
		"gen.Foo",
		dir.join( "gen/Foo.src" ),
		dir.join( "generated" ),
		dir.join( "templates" ),
	)
}

fn active_ids( project: &Project ) -> Vec<String> {
	project.artifacts().map(| artifact | artifact.id().to_string() ).collect()
}

#[test]
fn compiler_sees_only_declared_dependencies() {
	let dir = tempfile::tempdir().unwrap();
	let mut project = project_with_internal_artifact( dir.path() );
	let mut compiler = RecordingCompiler::producing( VALID_PROCESSOR );
	let logger = Arc::new( RecordingLogger::default() );

	ResolutionPipeline::new( &mut project, &ProjectResolver, &mut compiler, logger )
		.resolve( &resource_in( dir.path() ))
		.expect( "the compile fallback should succeed" );

	assert_eq!( compiler.seen_artifacts[0], vec![ DECLARED.to_string() ]);
	assert_eq!( active_ids( &project ), vec![ INTERNAL.to_string(), DECLARED.to_string() ]);
}

#[test]
fn compile_failure_restores_the_artifact_view() {
	let dir = tempfile::tempdir().unwrap();
	let mut project = project_with_internal_artifact( dir.path() );
	let mut compiler = RecordingCompiler::failing( "borked" );
	let logger = Arc::new( RecordingLogger::default() );

	let result = ResolutionPipeline::new( &mut project, &ProjectResolver, &mut compiler, logger )
		.resolve( &resource_in( dir.path() ));
	match result {
		Err( ResolveError::Compile { .. } ) => {}
		other => panic!( "Expected Compile error, got: {:#?}", other ),
	}
	assert_eq!( active_ids( &project ), vec![ INTERNAL.to_string(), DECLARED.to_string() ]);
}

#[test]
fn failed_reload_restores_the_artifact_view() {
	let dir = tempfile::tempdir().unwrap();
	let mut project = project_with_internal_artifact( dir.path() );
	// Reports success without producing a component, so the reload misses.
	let mut compiler = RecordingCompiler::default();
	let logger = Arc::new( RecordingLogger::default() );

	let result = ResolutionPipeline::new( &mut project, &ProjectResolver, &mut compiler, logger )
		.resolve( &resource_in( dir.path() ));
	match result {
		Err( ResolveError::Load( LoadError::NotFound { .. } )) => {}
		other => panic!( "Expected NotFound after the reload, got: {:#?}", other ),
	}
	assert_eq!( compiler.calls, 1 );
	assert_eq!( active_ids( &project ), vec![ INTERNAL.to_string(), DECLARED.to_string() ]);
}
