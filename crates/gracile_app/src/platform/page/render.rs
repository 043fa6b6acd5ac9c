use gracile_core::AppViewModel;

use super::constants::{ALERT_ERROR, ALERT_SUCCESS};
use super::DomCommand;

pub fn render(view: &AppViewModel) -> Vec<DomCommand> {
    let regions = [
        (ALERT_ERROR, &view.error_region),
        (ALERT_SUCCESS, &view.success_region),
    ];
    let (shown, hidden): (Vec<_>, Vec<_>) =
        regions.into_iter().partition(|(_, region)| region.visible);

    let mut cmds = Vec::with_capacity(4);
    // Hide before show so both regions are never visible mid-render.
    for (element_id, _) in hidden {
        cmds.push(DomCommand::Hide { element_id });
    }
    for (element_id, region) in shown {
        cmds.push(DomCommand::SetText {
            element_id,
            text: region.text.clone(),
        });
        cmds.push(DomCommand::Show { element_id });
    }
    cmds
}

#[cfg(test)]
mod tests {
    use gracile_core::StatusRegionView;

    use super::*;

    #[test]
    fn hides_before_showing() {
        let view = AppViewModel {
            error_region: StatusRegionView {
                text: "bad url".to_string(),
                visible: true,
            },
            success_region: StatusRegionView {
                text: "old".to_string(),
                visible: false,
            },
            ..AppViewModel::default()
        };

        assert_eq!(
            render(&view),
            vec![
                DomCommand::Hide {
                    element_id: ALERT_SUCCESS
                },
                DomCommand::SetText {
                    element_id: ALERT_ERROR,
                    text: "bad url".to_string()
                },
                DomCommand::Show {
                    element_id: ALERT_ERROR
                },
            ]
        );
    }

    #[test]
    fn fresh_view_hides_everything() {
        assert_eq!(
            render(&AppViewModel::default()),
            vec![
                DomCommand::Hide {
                    element_id: ALERT_ERROR
                },
                DomCommand::Hide {
                    element_id: ALERT_SUCCESS
                },
            ]
        );
    }
}
