//! Processor instantiation and invocation.
//!
//! Takes the component the pipeline resolved, instantiates it in its own
//! store, verifies it actually exposes the processor capability, configures
//! it in a fixed order, and runs it. The processor's output is whatever it
//! writes under its output directory; the host does not inspect it.

use std::path::Path ;
use std::sync::Arc ;

use thiserror::Error ;
use wasmtime::Store ;
use wasmtime::component::{ ComponentExportIndex, Instance, Linker, Val };

use crate::host::{ self, HostContext, Logger, TemplateEngine };
use crate::loader::{ LoadedComponent, PROCESSOR_INTERFACE };
use crate::resource::{ ProcessorName, Resource };

/// Functions the processor interface must export.
const REQUIRED_EXPORTS: [&str; 3] = [ "set-output-directory", "set-resource-file", "process" ];

/// Why a resolved component could not be run as a processor.
#[derive( Error, Debug )]
pub enum InvokeError {
	/// The component failed to instantiate (unsatisfiable imports, failing
	/// start function, ...).
	#[error( "unable to instantiate processor {name}: {source}" )]
	Instantiation { name: ProcessorName, source: wasmtime::Error },
	/// The component instantiated fine but is not a processor.
	#[error( "{name} does not implement {PROCESSOR_INTERFACE} (missing export `{missing}`)" )]
	ContractViolation { name: ProcessorName, missing: String },
	/// The processor itself failed while being configured or run.
	#[error( "processor {name} failed: {source}" )]
	Execution { name: ProcessorName, source: wasmtime::Error },
}

/// A live processor instance, configured immediately before use and not
/// retained after [`LoadedProcessor::process`] returns.
pub struct LoadedProcessor {
	name: ProcessorName,
	store: Store<HostContext>,
	instance: Instance,
}

impl LoadedProcessor {
	/// Instantiates `loaded` in a fresh store wired to the host interface
	/// and verifies the processor contract before anything is called.
	pub fn instantiate( loaded: &LoadedComponent, name: &ProcessorName ) -> Result<Self, InvokeError> {
		let instantiation = | source | InvokeError::Instantiation { name: name.clone(), source };

		let mut linker = Linker::new( loaded.engine() );
		host::add_to_linker( &mut linker ).map_err( instantiation )?;

		let mut store = Store::new( loaded.engine(), HostContext::default() );
		let instance = linker.instantiate( &mut store, loaded.component() ).map_err( instantiation )?;

		let mut processor = Self { name: name.clone(), store, instance };
		processor.verify_contract()?;
		Ok( processor )
	}

	/// Checks that the processor interface and all of its functions are
	/// exported, so a contract violation surfaces before `process()` could
	/// ever run.
	fn verify_contract( &mut self ) -> Result<(), InvokeError> {
		let violation = | missing: &str | InvokeError::ContractViolation {
			name: self.name.clone(),
			missing: missing.to_string(),
		};

		let interface = self.instance
			.get_export_index( &mut self.store, None, PROCESSOR_INTERFACE )
			.ok_or_else(|| violation( PROCESSOR_INTERFACE ))?;
		for export in REQUIRED_EXPORTS {
			let index = self.instance.get_export_index( &mut self.store, Some( &interface ), export );
			let found = index.is_some_and(| index | self.instance.get_func( &mut self.store, index ).is_some() );
			if !found {
				return Err( violation( export ));
			}
		}
		Ok(())
	}

	pub fn set_output_directory( &mut self, path: &Path ) -> Result<(), InvokeError> {
		self.store.data_mut().output_directory = Some( path.to_path_buf() );
		self.call( "set-output-directory", &[ Val::String( path.to_string_lossy().into_owned() )], 0 )
	}

	pub fn set_resource_file( &mut self, path: &Path ) -> Result<(), InvokeError> {
		self.store.data_mut().resource_file = Some( path.to_path_buf() );
		self.call( "set-resource-file", &[ Val::String( path.to_string_lossy().into_owned() )], 0 )
	}

	/// Host-side wiring; the guest sees the logger through the `log` import.
	pub fn set_logger( &mut self, logger: Arc<dyn Logger> ) {
		self.store.data_mut().logger = Some( logger );
	}

	/// Host-side wiring; the guest sees the engine through the `render` import.
	pub fn set_template_engine( &mut self, engine: Box<dyn TemplateEngine> ) {
		self.store.data_mut().template_engine = Some( engine );
	}

	/// Runs the processor. Any trap or host-import failure is wrapped in
	/// [`InvokeError::Execution`]; scope cleanup is not this type's concern,
	/// that already happened in the pipeline.
	pub fn process( &mut self ) -> Result<(), InvokeError> {
		self.call( "process", &[], 0 )
	}

	fn call( &mut self, function: &str, args: &[Val], results: usize ) -> Result<(), InvokeError> {
		// verify_contract ran at instantiation; a miss here is unreachable.
		let func = self.export_func( function )
			.ok_or_else(|| InvokeError::ContractViolation { name: self.name.clone(), missing: function.to_string() })?;

		let mut buffer = vec![ Val::Tuple( vec![] ); results ];
		func.call( &mut self.store, args, &mut buffer )
			.map_err(| source | InvokeError::Execution { name: self.name.clone(), source })?;
		let _ = func.post_return( &mut self.store );
		Ok(())
	}

	fn export_func( &mut self, function: &str ) -> Option<wasmtime::component::Func> {
		let interface: ComponentExportIndex = self.instance
			.get_export_index( &mut self.store, None, PROCESSOR_INTERFACE )?;
		let index = self.instance.get_export_index( &mut self.store, Some( &interface ), function )?;
		self.instance.get_func( &mut self.store, index )
	}
}

impl std::fmt::Debug for LoadedProcessor {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "LoadedProcessor" )
			.field( "name", &self.name )
			.field( "data", &self.store.data() )
			.finish_non_exhaustive()
	}
}

/// Configures and runs a resolved processor against one resource.
///
/// Configuration order is fixed (output directory, resource file, logger,
/// template engine) - not semantically required, but deterministic.
pub fn invoke(
	loaded: &LoadedComponent,
	resource: &Resource,
	logger: Arc<dyn Logger>,
	template_engine: Box<dyn TemplateEngine>,
) -> Result<(), InvokeError> {
	let mut processor = LoadedProcessor::instantiate( loaded, resource.name() )?;
	processor.set_output_directory( resource.output_directory() )?;
	processor.set_resource_file( resource.source_file() )?;
	processor.set_logger( logger );
	processor.set_template_engine( template_engine );
	processor.process()
}
