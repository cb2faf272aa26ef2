use super::mounted;
use crate::*;

#[test]
fn attach_records_one_tooltip_per_element() {
    let (mut page, diagram) = mounted(Structure::new(vec![
        ShapeElement::node("User", Geometry::default()),
        ShapeElement::node("Planner", Geometry::default()),
    ]));
    let manager = TooltipManager::default();
    let mut scope = GenerationScope::new(diagram.generation(), 1);
    let [a, b] = [diagram.elements()[0].id, diagram.elements()[1].id];

    let first = manager.attach(&mut page, &mut scope, a, "You");
    assert!(first.is_some());
    assert_eq!(manager.attach(&mut page, &mut scope, a, "Again"), first);
    manager.attach(&mut page, &mut scope, b, "Planner");

    assert_eq!(scope.tooltip_count(), 2);
    assert_eq!(page.live_tooltips(), 2);
    let for_a = page.tooltips_for(a);
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].spec.content, "You");
}

#[test]
fn empty_content_creates_nothing() {
    let (mut page, diagram) = mounted(Structure::new(vec![ShapeElement::node(
        "User",
        Geometry::default(),
    )]));
    let manager = TooltipManager::default();
    let mut scope = GenerationScope::new(diagram.generation(), 1);
    assert_eq!(
        manager.attach(&mut page, &mut scope, diagram.elements()[0].id, ""),
        None
    );
    assert_eq!(page.live_tooltips(), 0);
}

#[test]
fn release_destroys_everything_even_when_targets_detached() {
    let (mut page, diagram) = mounted(Structure::new(vec![
        ShapeElement::node("User", Geometry::default()),
        ShapeElement::node("Planner", Geometry::default()),
    ]));
    let manager = TooltipManager::default();
    let mut scope = GenerationScope::new(diagram.generation(), 1);
    for el in diagram.elements() {
        manager.attach(&mut page, &mut scope, el.id, &el.text);
    }

    page.detach_element(diagram.elements()[1].id);
    assert_eq!(manager.release(&mut page, &mut scope), 2);
    assert_eq!(scope.tooltip_count(), 0);
    assert_eq!(page.live_tooltips(), 0);
}

#[test]
fn create_on_detached_element_is_swallowed() {
    let (mut page, diagram) = mounted(Structure::new(vec![ShapeElement::node(
        "User",
        Geometry::default(),
    )]));
    let id = diagram.elements()[0].id;
    page.detach_element(id);

    let manager = TooltipManager::default();
    let mut scope = GenerationScope::new(diagram.generation(), 1);
    assert_eq!(manager.attach(&mut page, &mut scope, id, "User"), None);
    assert_eq!(scope.tooltip_count(), 0);
}
