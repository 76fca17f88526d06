use std::sync::Arc ;

use stencil_host::{ invoke, InvokeError, Resource };

use crate::harness::{ load_installed, FailingEngine, RecordingLogger, HOST_CALLING_PROCESSOR };

#[test]
fn a_failing_template_engine_fails_the_invocation() {
	let dir = tempfile::tempdir().unwrap();

	let resource = Resource::new(
		"gen.Greeter",
		dir.path().join( "greeter.st" ),
		dir.path().join( "generated" ),
		dir.path().join( "templates" ),
	);
	let loaded = load_installed( dir.path(), resource.name(), HOST_CALLING_PROCESSOR );

	let result = invoke(
		&loaded,
		&resource,
		Arc::new( RecordingLogger::default() ),
		Box::new( FailingEngine ),
	);
	match result {
		Err( InvokeError::Execution { source, .. } ) => {
			assert!( format!( "{:?}", source ).contains( "no such template" ));
		}
		other => panic!( "Expected an Execution error, got: {:#?}", other ),
	}
	assert!( !dir.path().join( "generated" ).join( "out.txt" ).exists() );
}
