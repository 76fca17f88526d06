use std::sync::Arc ;

use stencil_host::{ invoke, InvokeError, Resource };

use crate::harness::{ load_installed, RecordingLogger, StubEngine, TRAPPING_PROCESSOR };

#[test]
fn a_trapping_processor_surfaces_as_an_execution_error() {
	let dir = tempfile::tempdir().unwrap();

	let resource = Resource::new(
		"gen.Trap",
		dir.path().join( "trap.st" ),
		dir.path().join( "generated" ),
		dir.path().join( "templates" ),
	);
	let loaded = load_installed( dir.path(), resource.name(), TRAPPING_PROCESSOR );

	let result = invoke(
		&loaded,
		&resource,
		Arc::new( RecordingLogger::default() ),
		Box::new( StubEngine ),
	);
	match result {
		Err( InvokeError::Execution { name, .. } ) => assert_eq!( name.as_str(), "gen.Trap" ),
		other => panic!( "Expected an Execution error, got: {:#?}", other ),
	}
}
