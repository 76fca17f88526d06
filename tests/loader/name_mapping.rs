use nonempty_collections::NEVec ;
use stencil_host::{ load, LoadError, ProcessorName };

use crate::harness::{ install_component, VALID_PROCESSOR };

#[test]
fn dotted_names_map_to_nested_paths() {
	let dir = tempfile::tempdir().unwrap();
	let name = ProcessorName::new( "gen.templates.Greeter" );

	let installed = install_component( dir.path(), &name, VALID_PROCESSOR );
	assert!( installed.ends_with( "gen/templates/Greeter.wasm" ));

	let locations = NEVec::new( dir.path().to_path_buf() );
	let loaded = load( &locations, &name ).expect( "the nested component should be found" );
	assert_eq!( loaded.path(), installed );
}

#[test]
fn missing_component_reports_searched_locations() {
	let dir = tempfile::tempdir().unwrap();
	let name = ProcessorName::new( "gen.Ghost" );

	let locations = NEVec::new( dir.path().to_path_buf() );
	match load( &locations, &name ) {
		Err( LoadError::NotFound { name, searched } ) => {
			assert_eq!( name.as_str(), "gen.Ghost" );
			assert!( searched.contains( dir.path().to_str().unwrap() ));
		}
		other => panic!( "Expected NotFound, got: {:#?}", other ),
	}
}
