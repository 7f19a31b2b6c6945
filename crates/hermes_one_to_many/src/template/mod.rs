pub mod one_to_many;
pub mod path_merger;
pub mod routing_response;
pub mod routing_template;
