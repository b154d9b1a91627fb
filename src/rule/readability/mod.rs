pub mod parameter_list_placement;

use crate::rule::registry::RuleRegistry;

pub fn register_all(registry: &mut RuleRegistry) {
    registry.register(Box::new(
        parameter_list_placement::ParameterListMustFollowDeclaration,
    ));
}
