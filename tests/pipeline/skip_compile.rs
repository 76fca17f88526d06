use std::sync::Arc ;

use stencil_host::{ Project, ProjectResolver, ResolutionPipeline, Resource };

use crate::harness::{ install_component, RecordingCompiler, RecordingLogger, VALID_PROCESSOR };

#[test]
fn existing_component_loads_without_compiling() {
	let dir = tempfile::tempdir().unwrap();
	let components = dir.path().join( "components" );

	let resource = Resource::new(
		"gen.Foo",
		dir.path().join( "gen/Foo.src" ),
		dir.path().join( "generated" ),
		dir.path().join( "templates" ),
	);
	let installed = install_component( &components, resource.name(), VALID_PROCESSOR );

	let mut project = Project::new( &components, vec![], vec![] );
	let mut compiler = RecordingCompiler::default();
	let logger = Arc::new( RecordingLogger::default() );

	let loaded = ResolutionPipeline::new( &mut project, &ProjectResolver, &mut compiler, logger.clone() )
		.resolve( &resource )
		.expect( "an installed component should load directly" );

	assert_eq!( loaded.path(), installed );
	assert_eq!( compiler.calls, 0 );
	assert!( !logger.contains( "Attempting to compile" ));
}
