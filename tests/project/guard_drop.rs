use stencil_host::{ Artifact, DependencyScope, Project };

fn active_ids( project: &Project ) -> Vec<String> {
	project.artifacts().map(| artifact | artifact.id().to_string() ).collect()
}

#[test]
fn dropping_the_guard_restores_the_previous_view() {
	let declared = Artifact::new( "a:model:1.0", "model.wasm", DependencyScope::Runtime );
	let internal = Artifact::new( "b:internal:0.0", "internal.wasm", DependencyScope::Runtime );
	let mut project = Project::new(
		"components",
		vec![ declared.clone(), internal ],
		vec![ declared ],
	);

	{
		let narrowed = project.narrow();
		assert_eq!( active_ids( &narrowed ), vec![ "a:model:1.0".to_string() ]);
		// Falls out of scope without an explicit restore, as it would on an
		// early return or a panic.
	}

	assert_eq!(
		active_ids( &project ),
		vec![ "a:model:1.0".to_string(), "b:internal:0.0".to_string() ],
	);
}
