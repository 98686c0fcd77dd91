mod tests_mo;
mod tests_node;
mod tests_pkgs;
