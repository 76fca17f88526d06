use std::sync::Arc ;

use stencil_host::{
	CommandCompiler, CompileError, Project, ProjectResolver, ResolutionPipeline,
	ResolveError, Resource,
};

use crate::harness::RecordingLogger ;

#[test]
fn versioned_compiler_binary_is_named_in_the_error() {
	let dir = tempfile::tempdir().unwrap();

	let resource = Resource::new(
		"gen.Foo",
		dir.path().join( "gen/Foo.src" ),
		dir.path().join( "generated" ),
		dir.path().join( "templates" ),
	).with_compiler_version( "9.9" );

	let mut project = Project::new( dir.path().join( "components" ), vec![], vec![] );
	let mut compiler = CommandCompiler::new( "stencilc-test-binary-that-does-not-exist" );
	let logger = Arc::new( RecordingLogger::default() );

	let result = ResolutionPipeline::new( &mut project, &ProjectResolver, &mut compiler, logger )
		.resolve( &resource );
	match result {
		Err( ResolveError::Compile { source: CompileError::Spawn { program, .. }, .. } ) => {
			assert_eq!( program, "stencilc-test-binary-that-does-not-exist-9.9" );
		}
		other => panic!( "Expected a Spawn error, got: {:#?}", other ),
	}
}
