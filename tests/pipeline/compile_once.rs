use std::sync::Arc ;

use stencil_host::{ Project, ProjectResolver, ResolutionPipeline, Resource };

use crate::harness::{ RecordingCompiler, RecordingLogger, VALID_PROCESSOR };

#[test]
fn missing_component_is_compiled_and_reloaded() {
	let dir = tempfile::tempdir().unwrap();
	let components = dir.path().join( "components" );
	let source = dir.path().join( "gen/Foo.src" );

	let resource = Resource::new(
		"gen.Foo",
		&source,
		dir.path().join( "generated" ),
		dir.path().join( "templates" ),
	);

	let mut project = Project::new( &components, vec![], vec![] );
	let mut compiler = RecordingCompiler::producing( VALID_PROCESSOR );
	let logger = Arc::new( RecordingLogger::default() );

	let loaded = ResolutionPipeline::new( &mut project, &ProjectResolver, &mut compiler, logger.clone() )
		.resolve( &resource )
		.expect( "the compile fallback should produce a loadable component" );

	let expected_output = components.join( "gen" ).join( "Foo.wasm" );
	assert_eq!( compiler.calls, 1 );
	assert_eq!( compiler.requests[0].source_file(), source );
	assert_eq!( compiler.requests[0].output_path(), expected_output );
	assert_eq!( loaded.path(), expected_output );

	assert!( logger.contains( "Unable to find the processor gen.Foo. Attempting to compile it..." ));
	assert!( logger.contains( "Compiling" ));
}
